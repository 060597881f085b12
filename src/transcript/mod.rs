//! 转录模块：获取通话转录，并在处理中（Pending）时按固定间隔轮询。

mod poller;

pub use crate::config::PollPolicy;
pub use poller::TranscriptPoller;
