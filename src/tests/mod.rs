mod common;
mod provenance_generation;
