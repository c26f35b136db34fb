//! Request identity extraction and permission guards.

pub mod auth;

#[cfg(test)]
mod test;
