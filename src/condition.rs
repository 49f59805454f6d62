use tokio::time::{Duration, Instant, sleep};

const POLL_QUANTUM: Duration = Duration::from_millis (10);

/// Polls `probe` every 10 ms until it returns true or `timeout` elapses,
/// returning the last probe result.  With no timeout, polls until satisfied.
pub async fn wait_for <P> (mut probe: P, timeout: Option <Duration>) -> bool
where P: FnMut () -> bool
{
	let started = Instant::now ();

	let mut satisfied = probe ();

	while !satisfied
	{
		if timeout . is_some_and (|timeout| started . elapsed () >= timeout)
		{
			break;
		}

		sleep (POLL_QUANTUM) . await;

		satisfied = probe ();
	}

	satisfied
}
