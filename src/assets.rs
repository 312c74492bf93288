/// Font loading and Parley text layout.
pub mod fonts;
