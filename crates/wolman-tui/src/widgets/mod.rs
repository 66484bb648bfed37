pub mod share_bar;
