mod contacts;
mod export;
mod helpers;
