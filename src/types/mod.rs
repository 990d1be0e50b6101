mod id;

pub use id::{HolidayId, MembershipId, OrganizationId, UserId, WorkEventId};
