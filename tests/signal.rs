use std::pin::pin;

use futures::future::FusedFuture;
use task_lifecycle::error::TaskError;
use task_lifecycle::signal::signal;
use tokio::time::{Duration, error::Elapsed, sleep, timeout};
use tokio_util::sync::CancellationToken;

#[tokio::main]
#[test]
async fn resolves_when_triggered () -> Result <(), Elapsed>
{
	let (trigger, waiter) = signal ();

	let awaitable = waiter . into_awaitable (CancellationToken::new ());

	tokio::spawn (async move
	{
		sleep (Duration::from_millis (20)) . await;

		trigger . trigger ();
	});

	assert_eq! (timeout (Duration::from_millis (200), awaitable) . await?, Ok (()));

	Ok (())
}

#[tokio::main]
#[test]
async fn resolves_immediately_when_already_triggered () -> Result <(), Elapsed>
{
	let (trigger, waiter) = signal ();

	trigger . trigger ();

	let awaitable = waiter . into_awaitable (CancellationToken::new ());

	assert_eq! (timeout (Duration::from_millis (100), awaitable) . await?, Ok (()));

	Ok (())
}

#[tokio::main]
#[test]
async fn cancellation_resolves_the_future () -> Result <(), Elapsed>
{
	let (_trigger, waiter) = signal ();
	let cancellation = CancellationToken::new ();

	let awaitable = waiter . into_awaitable (cancellation . clone ());

	cancellation . cancel ();

	assert_eq!
	(
		timeout (Duration::from_millis (100), awaitable) . await?,
		Err (TaskError::Cancelled)
	);

	Ok (())
}

#[tokio::main]
#[test]
async fn trigger_wins_over_a_simultaneous_cancellation () -> Result <(), Elapsed>
{
	let (trigger, waiter) = signal ();
	let cancellation = CancellationToken::new ();

	let awaitable = waiter . into_awaitable (cancellation . clone ());

	trigger . trigger ();
	cancellation . cancel ();

	assert_eq! (timeout (Duration::from_millis (100), awaitable) . await?, Ok (()));

	Ok (())
}

#[tokio::main]
#[test]
async fn resolution_terminates_the_future ()
{
	let (trigger, waiter) = signal ();

	let awaitable = waiter . into_awaitable (CancellationToken::new ());
	let mut awaitable = pin! (awaitable);

	assert! (!awaitable . is_terminated ());

	trigger . trigger ();

	assert_eq! (awaitable . as_mut () . await, Ok (()));

	assert! (awaitable . is_terminated ());
}
