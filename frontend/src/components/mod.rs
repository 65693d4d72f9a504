//! Reusable UI Components

mod button;
mod card;
mod toast;

pub use button::{Button, ButtonVariant};
pub use card::Card;
pub use toast::Toast;
