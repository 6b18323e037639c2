use nom::{
    Err,
    error::{VerboseError, VerboseErrorKind},
};


#[derive(Debug)]
pub enum Error {
    /// malformed encoding at a codec boundary: bad hex, bad base64, bad packer token
    Decode(String),
    /// block-cipher key/length/padding failure
    Crypto(&'static str),
    /// missing or empty key, malformed profile, missing chapter parameter
    Config(String),
    /// the chain completed but produced zero usable URLs
    EmptyResult,
    Parse(Err<Vec<VerboseErrorKind>>),
    Context(&'static str, u32, Box<Error>)
}

impl<'a> From<Err<VerboseError<&'a str>>> for Error {
    fn from(e: Err<VerboseError<&'a str>>) -> Self {
        Error::Parse(e.map(|e| e.errors.into_iter().map(|(_, k)| k).collect()))
    }
}

#[macro_export]
macro_rules! t {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(e) => return Err($crate::Error::Context(file!(), line!(), Box::new(e.into())))
        }
    }
}

#[macro_export]
macro_rules! decode {
    ($($t:tt)*) => {
        return Err($crate::Error::Decode(format!($($t)*)))
    };
}

#[macro_export]
macro_rules! expect {
    ($e:expr, $($t:tt)*) => {
        match $e {
            Some(v) => v,
            None => return Err($crate::Error::Decode(format!($($t)*)))
        }
    };
}

#[macro_export]
macro_rules! require {
    ($e:expr, $err:expr) => {
        if !$e {
            return Err($err)
        }
    };
}
