pub mod ports;
pub mod services;

#[cfg(test)]
pub mod test_support;
