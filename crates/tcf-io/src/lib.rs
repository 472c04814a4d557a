//! Reader and writer for test-case text.
//!
//! The text grammar is strict: tokens are separated by exactly one space, lines
//! end with exactly one `\n`, values never start with whitespace and the input
//! must end exactly where the format ends. Failures name the slot involved,
//! e.g. `Expected: <EOF> after 'M[1][1]'`.
//!
//! # Example
//!
//! ```
//! use tcf_io::IoCodec;
//! use tcf_model::{GridSegment, IoFormat, LineSegment, LinesSegment, Variables};
//!
//! let mut vars = Variables::new();
//! let a = vars.scalar::<i32>("A").unwrap();
//! let v = vars.sequence::<i32>("V").unwrap();
//! let m = vars.table::<i32>("M").unwrap();
//!
//! let mut builder = IoFormat::builder();
//! builder
//!     .input(LineSegment::new().with(a))
//!     .input(LinesSegment::new().with_sequence(v).with_size(2))
//!     .input(GridSegment::new(m, 2, 2));
//! let format = builder.build_for(&vars).unwrap();
//! let codec = IoCodec::new(&format);
//!
//! let mut data = vars.instantiate();
//! codec.parse_input(&mut data, "123\n42\n7\n5 6\n7 8\n").unwrap();
//! assert_eq!(data[v], vec![42, 7]);
//! assert_eq!(codec.print_input(&data).unwrap(), "123\n42\n7\n5 6\n7 8\n");
//! ```

mod codec;
mod error;
pub mod grammar;
mod layout;
mod multiple;

// Re-export error types
pub use error::{CodecError, Result};

pub use codec::IoCodec;
pub use grammar::{TOKEN_PREVIEW_LEN, TokenReader, TokenWriter};
pub use multiple::{CASE_COUNT_NAME, MultipleTestCasesCodec};
