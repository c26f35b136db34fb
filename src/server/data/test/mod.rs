mod book;
mod chapter;
mod purchase;
mod wallet;
