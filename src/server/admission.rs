use std::sync::Arc;

use tokio::sync::{OwnedSemaphorePermit, Semaphore};

/// Decides how many connection workers may be live at once.
#[derive(Debug, Clone)]
pub enum Admission {
    /// One worker per accepted connection, no limit.
    Unbounded,
    /// At most as many workers as the semaphore has permits; further clients
    /// wait in the listen backlog.
    Bounded(Arc<Semaphore>),
}

/// Held by a worker for as long as it owns its connection.
#[derive(Debug)]
pub struct Ticket {
    _permit: Option<OwnedSemaphorePermit>,
}

impl Admission {
    pub fn new(max_connections: Option<usize>) -> anyhow::Result<Self> {
        match max_connections {
            None => Ok(Admission::Unbounded),
            Some(0) => anyhow::bail!("max_connections must be at least 1"),
            Some(limit) => Ok(Admission::Bounded(Arc::new(Semaphore::new(limit)))),
        }
    }

    /// Waits until another worker may start.
    pub async fn admit(&self) -> Ticket {
        match self {
            Admission::Unbounded => Ticket { _permit: None },
            Admission::Bounded(semaphore) => {
                // the semaphore is never closed
                let permit = Arc::clone(semaphore).acquire_owned().await.ok();
                Ticket { _permit: permit }
            }
        }
    }

    /// Number of workers that could still start without waiting, if bounded.
    pub fn available(&self) -> Option<usize> {
        match self {
            Admission::Unbounded => None,
            Admission::Bounded(semaphore) => Some(semaphore.available_permits()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bounded_tickets_return_permits_on_drop() {
        let admission = Admission::new(Some(2)).unwrap();

        let first = admission.admit().await;
        let _second = admission.admit().await;
        assert_eq!(admission.available(), Some(0));

        drop(first);
        assert_eq!(admission.available(), Some(1));
    }

    #[test]
    fn zero_limit_is_rejected() {
        assert!(Admission::new(Some(0)).is_err());
        assert!(matches!(Admission::new(None).unwrap(), Admission::Unbounded));
    }
}
