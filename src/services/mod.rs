pub mod cms;
pub mod content;
