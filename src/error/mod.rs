mod notify_error;

pub use notify_error::{ErrorKind, NotifyError, NotifyResult};
