pub mod anim;
pub mod ops;
