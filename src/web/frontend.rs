//! Embedded HTML/CSS/JS frontend for the adpilot dashboard.
//!
//! The whole SPA is compiled into the binary as a string constant. The only
//! external asset is the charting library, loaded from its CDN. All state
//! lives server-side; the page renders whatever the JSON API returns.

/// The complete single-page dashboard HTML.
pub const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en" data-color-scheme="light">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>adpilot — Campaign Dashboard</title>
<script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.0/dist/chart.umd.min.js"></script>
<style>
:root {
  --bg: #fcfcf9;
  --surface: #fffffd;
  --border: rgba(94, 82, 64, 0.2);
  --text: #13343b;
  --text-muted: #626c71;
  --primary: #21808d;
  --success: #21808d;
  --error: #c0152f;
  --warning: #a84b2f;
  --info: #626c71;
  --radius: 8px;
  --font: -apple-system, BlinkMacSystemFont, 'Segoe UI', Helvetica, Arial, sans-serif;
}
[data-color-scheme="dark"] {
  --bg: #1f2121;
  --surface: #262828;
  --border: rgba(119, 124, 124, 0.3);
  --text: #f5f5f5;
  --text-muted: rgba(167, 169, 169, 0.7);
  --primary: #32b8c6;
  --success: #32b8c6;
  --error: #ff5459;
  --warning: #e68161;
}

* { margin: 0; padding: 0; box-sizing: border-box; }
body {
  background: var(--bg);
  color: var(--text);
  font-family: var(--font);
  font-size: 14px;
  line-height: 1.5;
}

/* Layout */
.app { display: flex; min-height: 100vh; }
nav {
  width: 220px;
  background: var(--surface);
  border-right: 1px solid var(--border);
  padding: 24px 12px;
}
nav h1 { font-size: 20px; margin: 0 12px 24px; color: var(--primary); }
.nav-item {
  display: block;
  width: 100%;
  padding: 10px 12px;
  margin-bottom: 4px;
  border: none;
  background: none;
  color: var(--text);
  text-align: left;
  border-radius: var(--radius);
  cursor: pointer;
  font-size: 14px;
}
.nav-item.active, .nav-item:hover { background: rgba(33, 128, 141, 0.12); color: var(--primary); }
main { flex: 1; padding: 24px 32px; }
header {
  display: flex;
  align-items: center;
  justify-content: space-between;
  margin-bottom: 24px;
  padding-bottom: 16px;
  border-bottom: 1px solid var(--border);
}
header h2 { font-size: 22px; text-transform: capitalize; }

.btn {
  padding: 8px 16px;
  border-radius: var(--radius);
  border: 1px solid var(--border);
  background: var(--surface);
  color: var(--text);
  cursor: pointer;
  font-size: 13px;
}
.btn.primary { background: var(--primary); color: #fff; border-color: var(--primary); }
.btn + .btn { margin-left: 8px; }

.grid { display: grid; gap: 16px; grid-template-columns: repeat(auto-fill, minmax(240px, 1fr)); }
.card {
  background: var(--surface);
  border: 1px solid var(--border);
  border-radius: var(--radius);
  padding: 16px;
}
.card h3, .card h4 { margin-bottom: 8px; }
.muted { color: var(--text-muted); font-size: 12px; }

/* KPIs */
.kpi-value { font-size: 28px; font-weight: 600; transition: transform .3s, color .3s; }
.kpi-value.pulse { transform: scale(1.05); color: var(--primary); }
.kpi-change { color: var(--success); font-size: 12px; }

.charts { display: grid; gap: 16px; grid-template-columns: repeat(auto-fit, minmax(360px, 1fr)); margin: 16px 0; }
.chart-box { height: 280px; position: relative; }

.activity-item { display: flex; gap: 12px; padding: 8px 0; border-bottom: 1px solid var(--border); }
.activity-item:last-child { border-bottom: none; }

.empty-state { text-align: center; padding: 48px; color: var(--text-muted); }
.status { font-size: 11px; padding: 2px 8px; border-radius: 12px; background: rgba(33, 128, 141, 0.15); color: var(--primary); }
.metrics { display: flex; justify-content: space-between; margin-top: 12px; }
.metrics div { text-align: center; }

/* Wizard */
.wizard { margin-bottom: 24px; }
.steps { display: flex; gap: 8px; margin-bottom: 16px; }
.step-dot { flex: 1; height: 4px; border-radius: 2px; background: var(--border); }
.step-dot.active { background: var(--primary); }
label { display: block; margin: 12px 0 4px; font-weight: 500; }
input, select, textarea {
  width: 100%;
  padding: 8px 10px;
  border: 1px solid var(--border);
  border-radius: var(--radius);
  background: var(--bg);
  color: var(--text);
  font: inherit;
}
textarea { min-height: 90px; }
.nlp { margin-top: 12px; }
.entity { display: inline-block; margin: 2px 4px 2px 0; padding: 2px 8px; border-radius: 12px; background: rgba(33, 128, 141, 0.12); font-size: 12px; }
.wizard-footer { display: flex; justify-content: space-between; margin-top: 16px; }

/* Upload */
.progress-bar { height: 6px; background: var(--border); border-radius: 3px; overflow: hidden; margin: 6px 0; }
.progress-fill { height: 100%; background: var(--primary); width: 0; transition: width .2s; }

/* Cohort */
.cohort { display: grid; grid-template-columns: repeat(10, 1fr); gap: 3px; }
.cohort-cell { background: var(--primary); color: #fff; text-align: center; padding: 6px 0; border-radius: 3px; font-size: 11px; }

/* Toasts & loading */
#toasts { position: fixed; top: 16px; right: 16px; display: flex; flex-direction: column; gap: 8px; z-index: 20; }
.toast { display: flex; gap: 10px; min-width: 260px; padding: 12px; border-radius: var(--radius); background: var(--surface); border-left: 4px solid var(--info); box-shadow: 0 4px 12px rgba(0,0,0,.12); }
.toast.success { border-color: var(--success); }
.toast.error { border-color: var(--error); }
.toast.warning { border-color: var(--warning); }
.toast-title { font-weight: 600; }
#loading { position: fixed; inset: 0; background: rgba(0,0,0,.35); display: none; align-items: center; justify-content: center; color: #fff; font-size: 16px; z-index: 10; }
#loading.show { display: flex; }
.hidden { display: none !important; }
</style>
</head>
<body>
<div class="app">
  <nav id="nav"></nav>
  <main>
    <header>
      <h2 id="title">dashboard</h2>
      <div>
        <button class="btn" data-action="export">Export Report</button>
        <button class="btn" data-action="toggle-theme" id="themeBtn">🌙</button>
      </div>
    </header>
    <div id="content"></div>
  </main>
</div>
<div id="toasts"></div>
<div id="loading">Working…</div>

<script>
const SECTIONS = ['dashboard', 'campaigns', 'assets', 'audience', 'creative', 'analytics'];
const state = { section: 'dashboard', charts: {}, pulseTimer: null, analyzeTimer: null };

// ---------------------------------------------------------------------------
// API
// ---------------------------------------------------------------------------

async function api(method, path, body) {
  const opts = { method, headers: {} };
  if (body !== undefined) {
    opts.headers['Content-Type'] = 'application/json';
    opts.body = JSON.stringify(body);
  }
  const resp = await fetch(path, opts);
  const data = await resp.json().catch(() => ({}));
  await showToasts();
  if (!resp.ok) throw new Error(data.error || resp.statusText);
  return data;
}

async function busy(fn) {
  document.getElementById('loading').classList.add('show');
  try { return await fn(); } finally { document.getElementById('loading').classList.remove('show'); }
}

async function showToasts() {
  const resp = await fetch('/api/toasts');
  const { toasts = [] } = await resp.json().catch(() => ({}));
  const icons = { success: '✓', error: '✗', warning: '⚠', info: 'ℹ' };
  const box = document.getElementById('toasts');
  for (const t of toasts) {
    const el = document.createElement('div');
    el.className = `toast ${t.kind}`;
    el.innerHTML = `<div>${icons[t.kind] || 'ℹ'}</div><div><div class="toast-title">${esc(t.title)}</div><div>${esc(t.message)}</div></div>`;
    el.addEventListener('click', () => el.remove());
    box.appendChild(el);
    setTimeout(() => el.remove(), 5000);
  }
}

function esc(s) {
  return String(s ?? '').replace(/[&<>"']/g, c => ({ '&': '&amp;', '<': '&lt;', '>': '&gt;', '"': '&quot;', "'": '&#39;' }[c]));
}

// ---------------------------------------------------------------------------
// Charts
// ---------------------------------------------------------------------------

function drawCharts(charts) {
  for (const { surface, config } of charts) {
    const canvas = document.getElementById(surface);
    if (!canvas || typeof Chart === 'undefined') continue;
    if (state.charts[surface]) state.charts[surface].destroy();
    try {
      state.charts[surface] = new Chart(canvas.getContext('2d'), config);
    } catch (e) {
      console.error(`failed to draw ${surface}`, e);
    }
  }
}

function chartBoxes(ids) {
  return `<div class="charts">${ids.map(id => `<div class="card"><div class="chart-box"><canvas id="${id}"></canvas></div></div>`).join('')}</div>`;
}

function empty(e) {
  return `<div class="empty-state"><h3>${esc(e.title)}</h3><p>${esc(e.message)}</p></div>`;
}

// ---------------------------------------------------------------------------
// Section renderers
// ---------------------------------------------------------------------------

const RENDER = {
  dashboard(v) {
    return `<div class="grid">${v.kpis.map(k => `
        <div class="card"><div class="muted">${esc(k.label)}</div>
        <div class="kpi-value" id="kpi-${k.id}">${esc(k.display)}</div>
        <div class="kpi-change">${esc(k.change)}</div></div>`).join('')}</div>
      ${chartBoxes(['performanceChart', 'funnelChart'])}
      <div class="card"><h3>Recent Activity</h3>${v.recent_activity.map(a => `
        <div class="activity-item"><span>${a.icon}</span><div><div>${esc(a.title)}</div>
        <div class="muted">${esc(a.time)}</div></div></div>`).join('')}</div>`;
  },

  campaigns(v) {
    const list = v.campaigns.length === 0 ? empty(v.empty) : `<div class="grid">${v.campaigns.map(c => `
      <div class="card"><div style="display:flex;justify-content:space-between">
        <div><h3>${esc(c.name)}</h3><div class="muted">${esc(c.platform)}</div></div>
        <span class="status">${esc(c.status)}</span></div>
        <div class="metrics"><div><b>${c.impressions}</b><div class="muted">Impressions</div></div>
        <div><b>${c.clicks}</b><div class="muted">Clicks</div></div>
        <div><b>${c.conversions}</b><div class="muted">Conversions</div></div></div></div>`).join('')}</div>`;
    return `<div style="margin-bottom:16px"><button class="btn primary" data-action="wizard-open">New Campaign</button></div>
      <div id="wizard" class="card wizard hidden"></div>
      <div id="campaignList" class="${v.wizard_open ? 'hidden' : ''}">${list}</div>`;
  },

  assets(v) {
    const list = v.assets.length === 0 ? empty(v.empty) : `<div class="grid">${v.assets.map(a => `
      <div class="card"><div class="muted">${a.is_image ? 'IMG' : 'FILE'}</div>
      <h4>${esc(a.name)}</h4><div class="muted">${esc(a.size)} • ${esc(a.mime_type)}</div></div>`).join('')}</div>`;
    return `<div class="card" style="margin-bottom:16px">
        <input type="file" id="fileInput" multiple>
        <div id="progressList"></div></div>${list}`;
  },

  audience(v) {
    return `<div class="card"><div id="filters">${renderFilters(v.filters)}</div>
      <div style="margin-top:16px">
        <button class="btn" data-action="add-filter">Add Filter</button>
        <button class="btn primary" data-action="create-audience">Create Audience</button></div>
      <h3 style="margin-top:16px">Estimated Size: <span id="estimatedSize">${esc(v.size_display)}</span></h3>
      <div class="muted">Reach potential: <span id="reachPotential">${esc(v.estimate.potential)}</span></div></div>`;
  },

  creative(v) {
    const gallery = v.creatives.length === 0 ? empty(v.empty) : `<div class="grid">${v.creatives.map(c => `
      <div class="card"><h4>${esc(c.title)}</h4><p>"${esc(c.excerpt)}"</p><div class="muted">Generated by AI</div></div>`).join('')}</div>`;
    return `<div class="card" style="margin-bottom:16px">
        <label for="creativePrompt">Prompt</label><textarea id="creativePrompt"></textarea>
        <label for="creativeStyle">Style</label><select id="creativeStyle">
          ${['Modern', 'Minimalist', 'Bold', 'Playful', 'Professional'].map(s => `<option>${s}</option>`).join('')}</select>
        <label for="creativeFormat">Format</label><select id="creativeFormat">
          ${['Square (1:1)', 'Landscape (16:9)', 'Portrait (9:16)', 'Story (9:16)'].map(s => `<option>${s}</option>`).join('')}</select>
        <div style="margin-top:12px"><button class="btn primary" data-action="generate-creative">Generate</button></div>
      </div>${gallery}`;
  },

  analytics(v) {
    return `${chartBoxes(['trendsChart', 'attributionChart'])}
      <div class="card"><h3>Cohort Retention</h3><div class="cohort">${v.cohort.flat().map(c =>
        `<div class="cohort-cell" style="opacity:${c.opacity}">${c.label}</div>`).join('')}</div></div>`;
  },
};

function renderFilters(filters) {
  return filters.map((f, i) => {
    const input = f.input === 'select'
      ? `<select data-change="filter-value" data-index="${i}">${f.options.map(o =>
          `<option ${o === f.value ? 'selected' : ''}>${esc(o)}</option>`).join('')}</select>`
      : `<input data-change="filter-value" data-index="${i}" value="${esc(f.value)}" placeholder="Enter ${esc(f.type.toLowerCase())}...">`;
    return `<div class="filter-group"><label>${esc(f.type)}
      <button class="btn" data-action="remove-filter" data-index="${i}">×</button></label>${input}</div>`;
  }).join('');
}

function renderWizard(w) {
  const box = document.getElementById('wizard');
  if (!box) return;
  box.classList.toggle('hidden', !w.visible);
  const list = document.getElementById('campaignList');
  if (list) list.classList.toggle('hidden', w.visible);
  const dots = w.progress.map(on => `<div class="step-dot ${on ? 'active' : ''}"></div>`).join('');
  let body = '';
  if (w.step === 1) {
    const f = w.form;
    body = `<label>Campaign Name</label><input data-form="name" value="${esc(f.name)}">
      <label>Platform</label><select data-form="platform">${['Meta Ads', 'Google Ads', 'LinkedIn Ads', 'TikTok Ads', 'Twitter Ads'].map(p =>
        `<option ${p === f.platform ? 'selected' : ''}>${p}</option>`).join('')}</select>
      <label>Objective</label><select data-form="objective">${['Brand Awareness', 'Lead Generation', 'Conversions', 'Traffic', 'Engagement'].map(o =>
        `<option ${o === f.objective ? 'selected' : ''}>${o}</option>`).join('')}</select>
      <label>Daily Budget ($)</label><input data-form="budget" type="number" value="${esc(f.budget)}">
      <label>Campaign Description</label><textarea data-form="description" data-change="analyze">${esc(f.description)}</textarea>
      <div class="nlp hidden" id="nlpResults"></div>`;
  } else if (w.step === 2 && w.insights) {
    body = `<h4>Audience Suggestions</h4><ul>${w.insights.audience_suggestions.map(s => `<li>${esc(s)}</li>`).join('')}</ul>
      <h4 style="margin-top:12px">Optimization Tips</h4><ul>${w.insights.optimization_tips.map(s => `<li>${esc(s)}</li>`).join('')}</ul>`;
  } else if (w.step === 3 && w.summary) {
    const s = w.summary;
    body = `<p><b>Name:</b> ${esc(s.name)}</p><p><b>Platform:</b> ${esc(s.platform)}</p>
      <p><b>Objective:</b> ${esc(s.objective)}</p><p><b>Daily Budget:</b> $${esc(s.budget)}</p>
      <p><b>Description:</b> ${esc(s.description)}</p>`;
  }
  const primary = w.primary_action === 'deploy'
    ? `<button class="btn primary" data-action="wizard-deploy">Deploy Campaign</button>`
    : `<button class="btn primary" data-action="wizard-next">Next</button>`;
  box.innerHTML = `<div class="steps">${dots}</div>${body}
    <div class="wizard-footer"><div>
      <button class="btn" data-action="wizard-close">Cancel</button>
      <button class="btn ${w.step === 1 ? 'hidden' : ''}" data-action="wizard-prev">Previous</button></div>${primary}</div>`;
}

function readForm() {
  const form = {};
  document.querySelectorAll('[data-form]').forEach(el => { form[el.dataset.form] = el.value; });
  return form;
}

// ---------------------------------------------------------------------------
// Navigation
// ---------------------------------------------------------------------------

async function navigate(section) {
  const view = await api('GET', `/api/section/${section}`);
  state.section = view.section;
  document.getElementById('title').textContent = view.section;
  document.querySelectorAll('.nav-item').forEach(el =>
    el.classList.toggle('active', el.dataset.section === view.section));
  document.getElementById('content').innerHTML = RENDER[view.section](view);
  if (view.charts) drawCharts(view.charts);
  if (view.section === 'campaigns') renderWizard(await api('GET', '/api/wizard'));
}

// ---------------------------------------------------------------------------
// Actions — dispatched by data-action
// ---------------------------------------------------------------------------

async function wizardAction(action) {
  if (action !== 'deploy' && action !== 'close' && document.querySelector('[data-form]')) {
    await api('PUT', '/api/wizard/form', readForm());
  }
  if (action === 'deploy') {
    await busy(() => api('POST', '/api/wizard/deploy'));
    return navigate('campaigns');
  }
  renderWizard(await api('POST', `/api/wizard/${action}`));
  const list = document.getElementById('campaignList');
  if (list && action === 'close') list.classList.remove('hidden');
}

const ACTIONS = {
  'navigate': el => navigate(el.dataset.section),
  'wizard-open': () => wizardAction('open'),
  'wizard-close': () => wizardAction('close'),
  'wizard-next': () => wizardAction('next'),
  'wizard-prev': () => wizardAction('prev'),
  'wizard-deploy': () => wizardAction('deploy'),
  'add-filter': async () => { await api('POST', '/api/audience/filters'); return navigate('audience'); },
  'remove-filter': async el => { await api('DELETE', `/api/audience/filters/${el.dataset.index}`); return navigate('audience'); },
  'create-audience': () => api('POST', '/api/audience'),
  'generate-creative': async () => {
    const body = {
      prompt: document.getElementById('creativePrompt').value,
      style: document.getElementById('creativeStyle').value,
      format: document.getElementById('creativeFormat').value,
    };
    await busy(() => api('POST', '/api/creatives', body));
    return navigate('creative');
  },
  'export': () => busy(() => api('POST', '/api/export')),
  'toggle-theme': async () => applyTheme((await api('POST', '/api/theme/toggle')).theme),
};

const CHANGES = {
  'filter-value': async el => {
    await api('PUT', `/api/audience/filters/${el.dataset.index}`, { value: el.value });
  },
  'analyze': el => {
    clearTimeout(state.analyzeTimer);
    state.analyzeTimer = setTimeout(async () => {
      const res = await api('POST', '/api/analyze', { text: el.value });
      const box = document.getElementById('nlpResults');
      if (!box) return;
      box.classList.toggle('hidden', !res.analysis);
      if (!res.analysis) return;
      box.innerHTML = `<div><b>Sentiment:</b> ${esc(res.sentiment)}</div>
        <div><b>Intent:</b> ${esc(res.intent)}</div>
        <div><b>Entities:</b> ${res.analysis.entities.length === 0 ? '<span class="muted">None detected</span>' :
          res.analysis.entities.map(e => `<span class="entity">${esc(e.value)} (${esc(e.type)})</span>`).join('')}</div>`;
    }, 300);
  },
};

document.addEventListener('click', async e => {
  const el = e.target.closest('[data-action]');
  if (!el || !ACTIONS[el.dataset.action]) return;
  e.preventDefault();
  try { await ACTIONS[el.dataset.action](el); } catch (err) { console.error(err); }
});

document.addEventListener('input', e => {
  const el = e.target.closest('[data-change]');
  if (el && el.dataset.change === 'analyze' && CHANGES.analyze) CHANGES.analyze(el);
});

document.addEventListener('change', async e => {
  if (e.target.id === 'fileInput') {
    const files = Array.from(e.target.files).map(f => ({ name: f.name, size: f.size, type: f.type }));
    const list = document.getElementById('progressList');
    list.innerHTML = files.map(f => `<div><b>${esc(f.name)}</b><div class="progress-bar"><div class="progress-fill"></div></div></div>`).join('');
    try {
      const { uploads } = await busy(() => api('POST', '/api/uploads', { files }));
      uploads.forEach((u, i) => {
        const fill = list.querySelectorAll('.progress-fill')[i];
        u.ticks.forEach((p, t) => setTimeout(() => { fill.style.width = `${p}%`; }, t * 60));
      });
      setTimeout(() => navigate('assets'), 1200);
    } catch (err) { console.error(err); }
    return;
  }
  const el = e.target.closest('[data-change]');
  if (!el || el.dataset.change === 'analyze' || !CHANGES[el.dataset.change]) return;
  try { await CHANGES[el.dataset.change](el); await navigate(state.section); } catch (err) { console.error(err); }
});

// ---------------------------------------------------------------------------
// Theme & real-time pulse
// ---------------------------------------------------------------------------

function applyTheme(theme) {
  document.documentElement.setAttribute('data-color-scheme', theme);
  document.getElementById('themeBtn').textContent = theme === 'dark' ? '☀️' : '🌙';
}

async function pulse() {
  if (state.section !== 'dashboard') return;
  const { highlight = [] } = await fetch('/api/metrics/pulse').then(r => r.json()).catch(() => ({}));
  for (const id of highlight) {
    const el = document.getElementById(`kpi-${id}`);
    if (!el) continue;
    el.classList.add('pulse');
    setTimeout(() => el.classList.remove('pulse'), 300);
  }
}

async function init() {
  document.getElementById('nav').innerHTML = '<h1>adpilot</h1>' + SECTIONS.map(s =>
    `<button class="nav-item" data-action="navigate" data-section="${s}">${s[0].toUpperCase() + s.slice(1)}</button>`).join('');
  const { theme } = await fetch('/api/theme').then(r => r.json());
  applyTheme(theme);
  await navigate('dashboard');
  const { interval_ms = 5000 } = await fetch('/api/metrics/pulse').then(r => r.json()).catch(() => ({}));
  state.pulseTimer = setInterval(pulse, interval_ms);
}

init();
</script>
</body>
</html>
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_section_has_a_renderer() {
        for section in crate::navigation::Section::ALL {
            assert!(
                INDEX_HTML.contains(&format!("  {}(v) {{", section.as_str())),
                "no renderer for {section}"
            );
        }
    }

    #[test]
    fn every_chart_surface_has_a_canvas_slot() {
        for surface in crate::charts::presets::SURFACES {
            assert!(INDEX_HTML.contains(&format!("'{surface}'")), "{surface}");
        }
    }
}
