pub mod console;
pub mod device;
pub mod error;
pub mod log;
pub mod proto;
pub mod record;
pub mod replay;
pub mod session;

#[cfg(test)]
mod test;
