mod post;

pub use post::{PostAttachment, PostComment, PostDetails};
