mod layout;
pub use layout::{Guarded, Shell};

mod login;
pub use login::Login;

mod signup;
pub use signup::Signup;

mod register_word;
pub use register_word::RegisterWord;

mod word_list;
pub use word_list::WordList;

mod not_found;
pub use not_found::NotFound;
