mod post_dto;

pub use post_dto::{
    AttachmentUploadedDto, CreateCommentDto, CreatePostDto, PostAttachmentDto,
    PostAttachmentInputDto, PostCommentDto, PostResponseDto,
};
