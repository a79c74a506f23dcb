use crate::domain::model::{ContactRow, ContactSubmission, DispatchOutcome};
use crate::utils::error::Result;
use async_trait::async_trait;

/// 呼叫端能否看到 relay 回應的狀態碼與內容
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseVisibility {
    /// 跨來源 opaque 模式：只看得到傳輸層的失敗
    Opaque,
    Transparent,
}

/// 前端把聯絡表單送到 relay 端點
#[async_trait]
pub trait Relay: Send + Sync {
    async fn dispatch(&self, submission: &ContactSubmission) -> DispatchOutcome;

    fn visibility(&self) -> ResponseVisibility;
}

/// relay 服務背後的試算表：新增一列
#[async_trait]
pub trait SheetSink: Send + Sync {
    async fn append_row(&self, row: ContactRow) -> Result<()>;
}

#[async_trait]
impl<T: Relay + ?Sized> Relay for Box<T> {
    async fn dispatch(&self, submission: &ContactSubmission) -> DispatchOutcome {
        (**self).dispatch(submission).await
    }

    fn visibility(&self) -> ResponseVisibility {
        (**self).visibility()
    }
}
