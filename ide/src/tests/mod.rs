#[cfg(test)]
mod test_api;
