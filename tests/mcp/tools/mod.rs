mod config;
mod modify;
mod scan;
