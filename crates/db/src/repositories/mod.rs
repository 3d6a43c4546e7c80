pub mod car_repo;

pub use car_repo::CarRepo;
