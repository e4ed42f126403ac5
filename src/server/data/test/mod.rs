mod coaching;
mod point_transaction;
mod user;
mod vocabulary;
