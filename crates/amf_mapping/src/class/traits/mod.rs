mod hash;
mod init;
mod message;

pub use hash::{AmfHash, ClassTraitHash};
pub use init::{AmfInit, ClassTraitInit};
pub use message::ClassTraitMessage;
