mod report_dto;

pub use report_dto::{
    AddCommentDto, CommentResponseDto, CreateReportDto, ListReportsQuery, NearbyQuery,
    ReportDetailResponseDto, ReportListResponseDto, ReportResponseDto, SubscriptionStatusDto,
    UpdateReportStatusDto,
};
