mod common;
mod text;
