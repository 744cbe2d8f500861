pub mod articles;
pub mod board;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod db;
pub mod matching;
pub mod models;
pub mod navigation;
pub mod odds;
pub mod ranking;
pub mod web;
