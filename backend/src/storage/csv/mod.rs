pub mod connection;
pub mod member_repository;

pub use connection::CsvConnection;
pub use member_repository::MemberRepository;
