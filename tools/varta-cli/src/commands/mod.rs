pub mod crop;
pub mod fit;
pub mod info;
pub mod init;
pub mod print;
pub mod render;
pub mod themes;
