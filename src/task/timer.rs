use tokio::time::{Duration, sleep};
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Invokes an action at a fixed interval on a background task, the first
/// invocation immediately on start.  A panic inside the action terminates
/// the loop; the wrapper neither catches nor retries.
pub struct TimerTask
{
	cancellation: Option <CancellationToken>
}

impl TimerTask
{
	pub fn new () -> Self
	{
		Self {cancellation: None}
	}

	pub fn start <F>
	(
		&mut self,
		action: F,
		interval: Duration,
		cancellation: &CancellationToken
	)
	-> Result <(), TaskError>
	where F: FnMut () + Send + 'static
	{
		if self . cancellation . is_some ()
		{
			return Err (TaskError::AlreadyRunning);
		}

		let cancellation = cancellation . child_token ();

		tokio::spawn (run (action, interval, cancellation . clone ()));

		self . cancellation = Some (cancellation);

		Ok (())
	}

	pub fn stop (&mut self)
	{
		if let Some (cancellation) = self . cancellation . take ()
		{
			cancellation . cancel ();
		}
	}
}

impl Default for TimerTask
{
	fn default () -> Self
	{
		Self::new ()
	}
}

impl Drop for TimerTask
{
	fn drop (&mut self)
	{
		self . stop ();
	}
}

// The interval wait is interruptible so a stop takes effect without sitting
// out the rest of the interval.
async fn run <F> (mut action: F, interval: Duration, cancellation: CancellationToken)
where F: FnMut () + Send + 'static
{
	while !cancellation . is_cancelled ()
	{
		action ();

		tokio::select!
		{
			_ = cancellation . cancelled () => {},
			_ = sleep (interval) => {}
		}
	}
}
