#[cfg(test)]
mod common;
#[cfg(test)]
mod test_dash_completion;
