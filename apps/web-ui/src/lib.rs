pub fn app_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
    <meta charset="utf-8" />
    <meta name="viewport" content="width=device-width, initial-scale=1" />
    <title>Object Browser</title>
    <style>
        body { font-family: system-ui, sans-serif; margin: 1.5rem; background: #fafafa; }
        main { max-width: 760px; margin: 0 auto; }
        section { background: #fff; border: 1px solid #ddd; border-radius: 8px; padding: 1rem; margin-bottom: 1rem; }
        h1, h2 { margin-top: 0; }
        label { display: block; margin: 0.4rem 0 0.2rem; font-weight: 600; }
        input, button { font: inherit; }
        input { width: 100%; padding: 0.5rem; border: 1px solid #ccc; border-radius: 6px; box-sizing: border-box; }
        button { padding: 0.4rem 0.8rem; border: 1px solid #888; border-radius: 6px; background: #f5f5f5; cursor: pointer; }
        .actions { margin-top: 0.6rem; display: flex; gap: 0.5rem; flex-wrap: wrap; }
        #rows { max-height: 60vh; overflow-y: auto; }
        .row { display: grid; grid-template-columns: 1fr 1fr auto; gap: 0.75rem; align-items: center; padding: 0.5rem 0; border-bottom: 1px solid #eee; }
        .name { font-weight: 600; }
        .data { color: #555; }
        .muted { color: #666; font-size: 0.92rem; }
        .error { color: #a00; }
    </style>
</head>
<body>
    <main>
        <h1>Object Browser</h1>

        <section>
            <div class="actions">
                <button onclick="post('/api/refresh')">Refresh</button>
                <button onclick="openForm('/api/form/new')">Add</button>
            </div>
            <p id="status" class="muted"></p>
        </section>

        <section id="form" hidden>
            <h2 id="form-title">New object</h2>
            <label for="name-input">Name</label>
            <input id="name-input" />
            <label for="data-input">Data</label>
            <input id="data-input" />
            <div class="actions"><button onclick="sendForm()">Send</button></div>
        </section>

        <section>
            <h2>Objects</h2>
            <div id="rows"><p class="muted">(no data yet)</p></div>
        </section>
    </main>

    <script>
        function setStatus(text, isError) {
            const status = document.getElementById('status');
            status.textContent = text;
            status.className = isError ? 'error' : 'muted';
        }

        function rowElement(row) {
            const item = document.createElement('div');
            item.className = 'row';

            const name = document.createElement('span');
            name.className = 'name';
            name.textContent = row.name;

            const data = document.createElement('span');
            data.className = 'data';
            data.textContent = row.data_text;

            const actions = document.createElement('span');
            actions.className = 'actions';
            const edit = document.createElement('button');
            edit.textContent = 'Edit';
            edit.onclick = () => openForm('/api/form/edit/' + encodeURIComponent(row.id));
            const remove = document.createElement('button');
            remove.textContent = 'Delete';
            remove.onclick = () => request('DELETE', '/api/objects/' + encodeURIComponent(row.id));
            actions.append(edit, remove);

            item.append(name, data, actions);
            return item;
        }

        function render(view, fillForm) {
            const rows = document.getElementById('rows');
            rows.replaceChildren(...view.rows.map(rowElement));
            if (view.rows.length === 0) {
                rows.innerHTML = '<p class="muted">(no objects)</p>';
            }

            const form = document.getElementById('form');
            form.hidden = !view.form.visible;
            document.getElementById('form-title').textContent =
                view.editing ? 'Edit object ' + view.editing : 'New object';
            // Inputs hold what the user typed; only opening the form resets them.
            if (fillForm) {
                document.getElementById('name-input').value = view.form.fields.name;
                document.getElementById('data-input').value = view.form.fields.info;
            }
        }

        async function request(method, url, body, fillForm) {
            const options = { method };
            if (body !== undefined) {
                options.headers = { 'content-type': 'application/json' };
                options.body = JSON.stringify(body);
            }
            try {
                const response = await fetch(url, options);
                const payload = await response.json();
                if (!response.ok) {
                    throw new Error(payload.error || JSON.stringify(payload));
                }
                render(payload, fillForm === true);
                setStatus('', false);
            } catch (err) {
                setStatus(err.message, true);
            }
        }

        function post(url) {
            return request('POST', url);
        }

        function openForm(url) {
            return request('POST', url, undefined, true);
        }

        function sendForm() {
            return request('POST', '/api/form/submit', {
                name: document.getElementById('name-input').value,
                info: document.getElementById('data-input').value
            });
        }

        request('GET', '/api/view', undefined, true);
    </script>
</body>
</html>
"#
    .to_string()
}
