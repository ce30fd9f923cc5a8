#![no_std]

pub mod buzzer;
pub mod edges;
pub mod oled;
pub mod sdcard;
pub mod time;
