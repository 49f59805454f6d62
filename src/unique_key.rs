/// Generates an opaque 32-character hexadecimal identifier.
pub fn generate () -> String
{
	format! ("{:032x}", rand::random::<u128> ())
}
