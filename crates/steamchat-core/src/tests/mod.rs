mod connection;
mod menu;
mod probe;
mod support;
