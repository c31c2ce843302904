mod notification;

pub use notification::{
    ApiReply, GENERIC_FAILURE, NotificationRequest, NotificationResult, PARSE_MODE_HTML,
    SENT_MESSAGE, SendMessagePayload,
};
