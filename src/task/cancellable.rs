use std::any::Any;
use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use tokio::task::{JoinHandle, spawn_blocking};
use tokio_util::sync::CancellationToken;
use tracing::{Level, event};

use crate::error::TaskError;

use super::completion::{CompletionState, panic_message};

/// Supervises a single blocking action on the runtime's blocking pool.
/// Cancellation is cooperative: `stop` signals the token the action was
/// handed and never interrupts work that does not observe it.
pub struct CancellableTask
{
	cancellation: Option <CancellationToken>,
	execution: Option <JoinHandle <()>>,
	completion: Option <Arc <CompletionState>>,
	state: Option <Arc <dyn Any + Send + Sync>>
}

impl CancellableTask
{
	pub fn new () -> Self
	{
		Self
		{
			cancellation: None,
			execution: None,
			completion: None,
			state: None
		}
	}

	pub fn start <F> (&mut self, action: F) -> Result <(), TaskError>
	where F: FnOnce (CancellationToken) + Send + 'static
	{
		self . launch (action, CancellationToken::new (), None)
	}

	pub fn start_with_token <F>
	(
		&mut self,
		action: F,
		cancellation: &CancellationToken
	)
	-> Result <(), TaskError>
	where F: FnOnce (CancellationToken) + Send + 'static
	{
		self . launch (action, cancellation . child_token (), None)
	}

	pub fn start_with_state <F, S>
	(
		&mut self,
		action: F,
		state: S,
		cancellation: &CancellationToken
	)
	-> Result <(), TaskError>
	where
		F: FnOnce (CancellationToken, Arc <S>) + Send + 'static,
		S: Send + Sync + 'static
	{
		let state = Arc::new (state);
		let action_state = state . clone ();
		let kept_state: Arc <dyn Any + Send + Sync> = state;

		self . launch
		(
			move |token| action (token, action_state),
			cancellation . child_token (),
			Some (kept_state)
		)
	}

	fn launch <F>
	(
		&mut self,
		action: F,
		cancellation: CancellationToken,
		state: Option <Arc <dyn Any + Send + Sync>>
	)
	-> Result <(), TaskError>
	where F: FnOnce (CancellationToken) + Send + 'static
	{
		if self . cancellation . is_some ()
		{
			return Err (TaskError::AlreadyRunning);
		}

		let completion = Arc::new (CompletionState::new ());

		let execution =
		{
			let cancellation = cancellation . clone ();
			let completion = completion . clone ();

			spawn_blocking (move || execute (action, cancellation, completion))
		};

		self . cancellation = Some (cancellation);
		self . execution = Some (execution);
		self . completion = Some (completion);
		self . state = state;

		Ok (())
	}

	/// Resolves once the action finishes or the task is cancelled.  `true`
	/// means the action ran to completion without faulting; `false` means
	/// the wait was interrupted by cancellation or the action panicked.
	/// Before any start this is a no-op returning `true`.
	pub async fn wait (&mut self) -> bool
	{
		let Some (mut execution) = self . execution . take () else
		{
			return true;
		};

		let Some (cancellation) = self . cancellation . clone () else
		{
			return false;
		};

		// The execution is polled first so an action that already finished
		// beats a simultaneous stop.
		tokio::select!
		{
			biased;

			join_result = &mut execution =>
				join_result . is_ok () && !self . is_faulted (),
			_ = cancellation . cancelled () =>
			{
				self . execution = Some (execution);

				false
			}
		}
	}

	pub fn stop (&mut self)
	{
		if let Some (cancellation) = self . cancellation . take ()
		{
			if !cancellation . is_cancelled ()
			{
				cancellation . cancel ();
			}
		}

		if self . execution . as_ref () . is_some_and (JoinHandle::is_finished)
		{
			self . execution = None;
		}
	}

	pub fn is_completed (&self) -> bool
	{
		self . completion . as_ref ()
			. is_some_and (|completion| completion . is_completed ())
	}

	pub fn is_faulted (&self) -> bool
	{
		self . completion . as_ref ()
			. is_some_and (|completion| completion . is_faulted ())
	}

	pub fn fault_message (&self) -> Option <String>
	{
		self . completion . as_ref ()
			. and_then (|completion| completion . fault_message ())
	}

	pub fn async_state <S> (&self) -> Option <Arc <S>>
	where S: Send + Sync + 'static
	{
		self . state . as_ref ()
			. and_then (|state| state . clone () . downcast::<S> () . ok ())
	}
}

impl Default for CancellableTask
{
	fn default () -> Self
	{
		Self::new ()
	}
}

impl Drop for CancellableTask
{
	fn drop (&mut self)
	{
		self . stop ();
	}
}

fn execute <F>
(
	action: F,
	cancellation: CancellationToken,
	completion: Arc <CompletionState>
)
where F: FnOnce (CancellationToken) + Send + 'static
{
	match catch_unwind (AssertUnwindSafe (move || action (cancellation)))
	{
		Ok (()) => completion . complete (),
		Err (payload) =>
		{
			let message = panic_message (payload . as_ref ());

			event!
			(
				Level::ERROR,
				%message,
				"task action panicked"
			);

			completion . fault (message);
		}
	}
}
