//! Bounding remote calls in time.
//!
//! Uses `futures-timer` so the bound works on whatever executor drives
//! the zbus connection.

use futures::{FutureExt, select};
use futures_timer::Delay;
use log::warn;
use std::future::Future;
use std::pin::pin;
use std::time::Duration;

use crate::Result;
use crate::api::models::SetupError;

/// Runs `call`, failing with `SetupError::Timeout` if it takes longer
/// than `timeout`.
pub(crate) async fn with_timeout<T, F>(operation: &'static str, timeout: Duration, call: F) -> Result<T>
where
    F: Future<Output = Result<T>>,
{
    let mut call = pin!(call.fuse());
    let mut delay = pin!(Delay::new(timeout).fuse());

    select! {
        res = call => res,
        _ = delay => {
            warn!("{operation} timed out after {timeout:?}");
            Err(SetupError::Timeout { operation, timeout })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::executor::block_on;
    use futures::future;

    #[test]
    fn passes_through_fast_result() {
        let res = block_on(with_timeout("Ping", Duration::from_secs(5), async {
            Ok::<_, SetupError>(7)
        }));
        assert_eq!(res.unwrap(), 7);
    }

    #[test]
    fn passes_through_fast_error() {
        let res: Result<()> = block_on(with_timeout("Ping", Duration::from_secs(5), async {
            Err(SetupError::NoWifiDevice)
        }));
        assert!(matches!(res, Err(SetupError::NoWifiDevice)));
    }

    #[test]
    fn times_out_pending_call() {
        let res: Result<()> = block_on(with_timeout(
            "Ping",
            Duration::from_millis(20),
            future::pending(),
        ));
        match res {
            Err(SetupError::Timeout { operation, timeout }) => {
                assert_eq!(operation, "Ping");
                assert_eq!(timeout, Duration::from_millis(20));
            }
            other => panic!("expected timeout, got {other:?}"),
        }
    }
}
