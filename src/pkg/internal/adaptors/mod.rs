pub mod conferences;
pub mod educations;
pub mod keywords;
pub mod resumes;
pub mod skills;
pub mod users;
