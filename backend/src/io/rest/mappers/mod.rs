pub mod member_mapper;

pub use member_mapper::MemberMapper;
