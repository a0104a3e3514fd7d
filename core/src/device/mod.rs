pub mod video_border;

pub use video_border::VideoBorder;
