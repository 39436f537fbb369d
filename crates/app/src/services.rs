//! Use-case services, generic over the port they drive.

pub mod todo_service;
