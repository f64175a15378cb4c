pub mod spin_vis3d;
