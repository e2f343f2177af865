// author: kodeholic (powered by Claude)

pub mod command;
pub mod dispatch;
pub mod message;
pub mod opcode;
pub mod packet;

pub use command::{process_command, Command};
pub use dispatch::dispatch_frame;
pub use packet::{decode, encode, encode_raw, Frame, FrameHeader};
