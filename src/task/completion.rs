use std::any::Any;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

pub (crate) struct CompletionState
{
	completed: AtomicBool,
	faulted: AtomicBool,
	fault: Mutex <Option <String>>
}

impl CompletionState
{
	pub (crate) fn new () -> Self
	{
		Self
		{
			completed: AtomicBool::new (false),
			faulted: AtomicBool::new (false),
			fault: Mutex::new (None)
		}
	}

	pub (crate) fn complete (&self)
	{
		self . completed . store (true, Ordering::Release);
	}

	// The message is stored before the flags so a reader that observes the
	// flags also observes the message.
	pub (crate) fn fault (&self, message: String)
	{
		if let Ok (mut fault) = self . fault . lock ()
		{
			*fault = Some (message);
		}

		self . faulted . store (true, Ordering::Release);
		self . completed . store (true, Ordering::Release);
	}

	pub (crate) fn is_completed (&self) -> bool
	{
		self . completed . load (Ordering::Acquire)
	}

	pub (crate) fn is_faulted (&self) -> bool
	{
		self . faulted . load (Ordering::Acquire)
	}

	pub (crate) fn fault_message (&self) -> Option <String>
	{
		self . fault . lock () . ok () . and_then (|fault| fault . clone ())
	}
}

pub (crate) fn panic_message (payload: &(dyn Any + Send)) -> String
{
	if let Some (message) = payload . downcast_ref::<&str> ()
	{
		(*message) . to_string ()
	}
	else if let Some (message) = payload . downcast_ref::<String> ()
	{
		message . clone ()
	}
	else
	{
		"task action panicked" . to_string ()
	}
}
