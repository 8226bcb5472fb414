pub trait Request {
    type Resp;
}

/// Read-only requests. Lookups that find nothing answer with an empty or
/// `None` response rather than an error.
pub trait Queryable<Req>
where
    Req: Request,
{
    fn query(&self, req: Req) -> Req::Resp;
}
