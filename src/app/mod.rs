// 應用層：contact relay HTTP 服務

pub mod server;
