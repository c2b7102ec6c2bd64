//! 后台任务
//!
//! 菜单刷新、评价轮播、日志清理都在这里登记。所有任务共享一个
//! [`CancellationToken`]，关闭时统一取消，并在截止时间后 abort 剩余任务。

use futures::FutureExt;
use futures::future::join_all;
use std::any::Any;
use std::fmt;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// 任务类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskKind {
    /// 一直运行直到关闭 (评价轮播)
    Worker,
    /// 按固定间隔执行 (菜单刷新、日志清理)
    Periodic,
}

impl fmt::Display for TaskKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TaskKind::Worker => "worker",
            TaskKind::Periodic => "periodic",
        })
    }
}

struct Entry {
    name: &'static str,
    kind: TaskKind,
    handle: JoinHandle<()>,
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload")
}

/// Runs `future` and reports how it ended
async fn supervise<F>(name: &'static str, kind: TaskKind, cancel: CancellationToken, future: F)
where
    F: Future<Output = ()>,
{
    match AssertUnwindSafe(future).catch_unwind().await {
        Ok(()) if cancel.is_cancelled() => {
            tracing::debug!(task = name, %kind, "Background task stopped");
        }
        Ok(()) => {
            tracing::warn!(task = name, %kind, "Background task exited before shutdown");
        }
        Err(payload) => {
            tracing::error!(
                task = name,
                %kind,
                panic = panic_message(payload.as_ref()),
                "Background task panicked"
            );
        }
    }
}

/// 后台任务集合
///
/// ```ignore
/// let mut tasks = BackgroundTasks::new();
/// tasks.spawn("menu_refresher", TaskKind::Periodic, refresher.run());
/// tasks.shutdown(Duration::from_secs(10)).await;
/// ```
#[derive(Default)]
pub struct BackgroundTasks {
    entries: Vec<Entry>,
    cancel: CancellationToken,
}

impl BackgroundTasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token cancelled when [`shutdown`](Self::shutdown) starts
    pub fn shutdown_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 启动任务；panic 会被捕获并记录，不会影响服务器
    pub fn spawn<F>(&mut self, name: &'static str, kind: TaskKind, future: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let handle = tokio::spawn(supervise(name, kind, self.cancel.clone(), future));
        tracing::debug!(task = name, %kind, "Background task started");
        self.entries.push(Entry { name, kind, handle });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn log_summary(&self) {
        let (periodic, workers): (Vec<&Entry>, Vec<&Entry>) = self
            .entries
            .iter()
            .partition(|e| e.kind == TaskKind::Periodic);
        let names: Vec<&str> = self.entries.iter().map(|e| e.name).collect();
        tracing::info!(
            total = self.entries.len(),
            workers = workers.len(),
            periodic = periodic.len(),
            tasks = ?names,
            "Background tasks running"
        );
    }

    /// Names of tasks that have already exited
    pub fn finished(&self) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| e.handle.is_finished())
            .map(|e| e.name)
            .collect()
    }

    /// 取消所有任务并等待退出
    ///
    /// 所有任务共用一个截止时间，超时的任务会被 abort。
    pub async fn shutdown(self, timeout: Duration) {
        tracing::info!(count = self.entries.len(), "Stopping background tasks");
        self.cancel.cancel();

        let deadline = Instant::now() + timeout;
        let waits = self.entries.into_iter().map(|entry| async move {
            let abort = entry.handle.abort_handle();
            match tokio::time::timeout_at(deadline, entry.handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!(task = entry.name, error = %e, "Background task failed"),
                Err(_) => {
                    tracing::warn!(task = entry.name, "Background task ignored shutdown, aborting");
                    abort.abort();
                }
            }
        });
        join_all(waits).await;

        tracing::info!("Background tasks stopped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_shutdown_cancels_tasks() {
        let mut tasks = BackgroundTasks::new();
        let token = tasks.shutdown_token();
        tasks.spawn("waiter", TaskKind::Worker, async move {
            token.cancelled().await;
        });
        assert_eq!(tasks.len(), 1);
        assert!(tasks.finished().is_empty());

        tasks.shutdown(Duration::from_secs(1)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_stuck_task_is_aborted() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("stuck", TaskKind::Periodic, std::future::pending());
        tasks.shutdown(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_panicking_task_is_contained() {
        let mut tasks = BackgroundTasks::new();
        tasks.spawn("boom", TaskKind::Worker, async { panic!("boom"); });

        tokio::time::timeout(Duration::from_secs(1), async {
            while tasks.finished().is_empty() {
                tokio::task::yield_now().await;
            }
        })
        .await
        .unwrap();
        assert_eq!(tasks.finished(), vec!["boom"]);
        tasks.shutdown(Duration::from_secs(1)).await;
    }

    #[test]
    fn test_panic_message() {
        let payload: Box<dyn Any + Send> = Box::new(String::from("index out of range"));
        assert_eq!(panic_message(payload.as_ref()), "index out of range");
        let payload: Box<dyn Any + Send> = Box::new(42_u8);
        assert_eq!(panic_message(payload.as_ref()), "non-string panic payload");
    }
}
