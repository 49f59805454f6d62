use thiserror::Error;

#[derive (Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum TaskError
{
	#[error ("task is already running; stop it before starting it again")]
	AlreadyRunning,

	#[error ("cancelled before completion")]
	Cancelled
}
