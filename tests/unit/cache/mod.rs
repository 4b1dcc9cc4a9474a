mod candidate;
mod occupancy;
