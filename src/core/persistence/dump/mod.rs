pub mod paginated_dump;
