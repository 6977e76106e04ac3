// External collaborators: landmark sources in, mouse backends out

pub mod input;
pub mod landmarks;
