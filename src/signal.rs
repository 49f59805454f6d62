use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};

use futures::future::FusedFuture;
use futures::task::AtomicWaker;
use pin_project::pin_project;
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};

use crate::error::TaskError;

struct Shared
{
	signalled: AtomicBool,
	waker: AtomicWaker
}

/// Creates a linked single-shot trigger/waiter pair.
pub fn signal () -> (SignalTrigger, SignalWaiter)
{
	let shared = Arc::new
	(
		Shared
		{
			signalled: AtomicBool::new (false),
			waker: AtomicWaker::new ()
		}
	);

	(
		SignalTrigger {shared: shared . clone ()},
		SignalWaiter {shared}
	)
}

pub struct SignalTrigger
{
	shared: Arc <Shared>
}

impl SignalTrigger
{
	pub fn trigger (&self)
	{
		self . shared . signalled . store (true, Ordering::Release);
		self . shared . waker . wake ();
	}
}

pub struct SignalWaiter
{
	shared: Arc <Shared>
}

impl SignalWaiter
{
	pub fn into_awaitable (self, cancellation: CancellationToken)
	-> SignalFuture
	{
		SignalFuture
		{
			shared: Some (self . shared),
			cancelled: cancellation . cancelled_owned ()
		}
	}
}

/// Resolves exactly once, to `Ok` when the trigger fires or to
/// `Err (TaskError::Cancelled)` when the token fires first; a trigger wins
/// over a simultaneous cancellation.
#[pin_project]
pub struct SignalFuture
{
	shared: Option <Arc <Shared>>,
	#[pin] cancelled: WaitForCancellationFutureOwned
}

impl Future for SignalFuture
{
	type Output = Result <(), TaskError>;

	fn poll (self: Pin <&mut Self>, cx: &mut Context) -> Poll <Self::Output>
	{
		let projection = self . project ();

		let resolution = match projection . shared
		{
			None => panic! ("signal future was polled after resolution"),
			Some (shared) =>
			{
				if shared . signalled . load (Ordering::Acquire)
				{
					Poll::Ready (Ok (()))
				}
				else
				{
					shared . waker . register (cx . waker ());

					// Re-check after registering: a trigger that fired
					// between the first check and the registration must not
					// be lost.
					if shared . signalled . load (Ordering::Acquire)
					{
						Poll::Ready (Ok (()))
					}
					else
					{
						match projection . cancelled . poll (cx)
						{
							Poll::Pending => Poll::Pending,
							Poll::Ready (()) =>
								Poll::Ready (Err (TaskError::Cancelled))
						}
					}
				}
			}
		};

		if resolution . is_ready ()
		{
			*projection . shared = None;
		}

		resolution
	}
}

impl FusedFuture for SignalFuture
{
	fn is_terminated (&self) -> bool
	{
		self . shared . is_none ()
	}
}
