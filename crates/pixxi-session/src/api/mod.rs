//! Typed methods over [`Session`](crate::Session), one per operation.
//!
//! Operations whose arguments are all words are generated by `bind!`; the
//! ones carrying text, runs or structured replies are written out by hand.

macro_rules! bind {
    ($( $(#[$meta:meta])* fn $method:ident($($arg:ident),*) -> $ret:ty = $call:ident($op:ident); )*) => {
        impl<T: pixxi_transport::Transport> crate::session::Session<T> {
            $(
                $(#[$meta])*
                pub fn $method(&mut self, $($arg: u16),*) -> crate::error::Result<$ret> {
                    self.$call(crate::table::Op::$op, &[$(crate::ops::Arg::Word($arg)),*])
                }
            )*
        }
    };
}

mod file;
mod gfx;
mod img;
mod media;
mod sys;
mod txt;
mod widget;

pub use file::FileSize;
