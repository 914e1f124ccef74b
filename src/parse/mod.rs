//! Locating shortcode tokens and code spans in plain text.

mod code;
mod shortcode;

pub use code::*;
pub use shortcode::*;

use nom::error::ErrorKind;
use nom::IResult;

type Input<'i> = &'i str;
type Result<'i, T> = IResult<Input<'i>, T, (Input<'i>, ErrorKind)>;
