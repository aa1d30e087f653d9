pub use init::*;
pub use list::*;
pub use run::*;

mod init;
mod list;
mod run;
