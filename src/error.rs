// Copyright (C) 2020-2026 Andy Kurnia.

// Errors here mean the caller passed something structurally broken.
// Ordinary outcomes (no path, no words) are None or empty instead.

pub struct MyError {
    s: String,
}

impl std::fmt::Display for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.s)
    }
}

impl std::fmt::Debug for MyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        (self as &dyn std::fmt::Display).fmt(f)
    }
}

impl std::error::Error for MyError {}

pub fn new(s: String) -> MyError {
    MyError { s }
}

pub type BoxAnyError = Box<dyn std::error::Error + Send + Sync>;
pub type Returns<T> = Result<T, BoxAnyError>;

#[macro_export]
macro_rules! return_error {
    ($error:expr) => {
        return Err($crate::error::new($error).into());
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn half(x: i32) -> Returns<i32> {
        if x % 2 != 0 {
            return_error!(format!("{} is odd", x));
        }
        Ok(x / 2)
    }

    #[test]
    fn test_return_error() {
        assert_eq!(half(4).unwrap(), 2);
        assert_eq!(half(3).unwrap_err().to_string(), "3 is odd");
    }
}
