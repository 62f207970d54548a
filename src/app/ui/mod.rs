mod details;
mod panels;
mod search;
