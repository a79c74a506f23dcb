// 領域層：純資料與 core 使用的 ports

pub mod icons;
pub mod model;
pub mod ports;
