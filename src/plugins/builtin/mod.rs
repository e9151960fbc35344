//! Built-in remote plugins
//!
//! Compiled into the binary and registered before any manifest plugins, so
//! they cannot be shadowed by a stray file in the plugins directory.

mod s3;
mod sftp;
mod webdav;

pub use s3::S3;
pub use sftp::Sftp;
pub use webdav::Webdav;
