use std::collections::HashSet;

use task_lifecycle::unique_key;

#[test]
fn keys_are_long_enough ()
{
	assert! (unique_key::generate () . len () >= 10);
}

#[test]
fn keys_do_not_repeat ()
{
	let keys: HashSet <String> =
		(0 .. 1000) . map (|_| unique_key::generate ()) . collect ();

	assert_eq! (keys . len (), 1000);
}
